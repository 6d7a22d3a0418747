// Domain layer: the maintenance report value types and their invariants.

pub mod model;
