//! Tortuga Core Types and Definitions
//!
//! This crate provides the foundational types for the Tortuga scene
//! language. It includes:
//!
//! - **Geometry**: Basic geometric types ([`geometry`] module)
//! - **Pen**: The abstract drawing cursor every renderer backend implements
//!   ([`pen::Pen`])
//! - **Scene**: The typed shape tree built from TML documents ([`scene`]
//!   module)
//! - **Draw**: The pen-driven rendering of a scene tree ([`draw`] module)

pub mod draw;
pub mod geometry;
pub mod pen;
pub mod scene;
