//! Physics domain: layers, query contracts, and their backends.

mod avian;
mod colliders;
mod layers;
mod query;

pub use avian::{AvianOverlap, AvianSurfaces, ColliderInfo};
pub use colliders::{ColliderSet, Contacts, StaticCollider};
pub use layers::{GameLayer, layer_bits};
pub use query::{ColliderHit, HitBuffer, OverlapQuery, SurfaceProbe};
