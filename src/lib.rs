//! Cutline Core Library
//!
//! Magnetic-timeline video editing engine: timeline data model, snapshot
//! undo/redo history, dual-buffered preview scheduling, and an AI tool
//! dispatch surface over the editing operations.
//!
//! The crate is a pure in-process library. Media decoding, rendering, chat
//! completion, and stock-media search live behind boundary traits
//! ([`core::playback::VideoSurface`], [`core::playback::AudioBackend`],
//! [`core::ai::ChatProvider`], [`core::stock::StockMediaProvider`]); the
//! engine itself never performs I/O.

pub mod core;
