mod hydrate;

pub use hydrate::HydrateSelection;
