//! Renderer backends for parsed scenes.
//!
//! The core crate only knows the abstract [`Pen`](tortuga_core::pen::Pen);
//! this module hosts the concrete backends. SVG is currently the only one.

pub mod svg;
