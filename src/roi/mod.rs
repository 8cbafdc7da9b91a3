//! Region of interest extraction from binary masks.
//!
//! The engine runs in three passes over one immutable mask:
//! - **Labeling**: two-pass connected-component labeling with union-find
//! - **Tracing**: Moore-neighbor boundary walk and box-local cell mask per region
//! - **Hierarchy**: nearest enclosing region and full surround chain per region
//!
//! [`RoiManager`] (or the free function [`extract_rois`]) runs the passes and
//! returns an immutable [`RoiMap`] snapshot.
//!
//! ## Ids
//!
//! Foreground regions are numbered `1..=N` in raster order of their first
//! cell. With [`RoiOptions::background`] set, background components are
//! numbered `-1..=-M` the same way.
//!
//! ## Topology
//!
//! `border` reports adjacency to the mask frame. `external` and `surround`
//! report nesting among regions only: a region away from the frame is still
//! external when no other region encloses it, which is the usual case when
//! background regions are not extracted.

pub mod hierarchy;
pub mod label;
pub mod manager;
pub mod region;
pub mod trace;

pub use hierarchy::Nesting;
pub use label::{label, label_with_background, Connectivity, LabelGrid};
pub use manager::{extract_rois, Roi, RoiFilter, RoiManager, RoiMap, RoiOptions};
pub use region::BoundingBox;
pub use trace::{trace, Trace};
