//! Scene graph, node components and scene persistence

pub mod components;
pub mod persistence;
pub mod scene_graph;

pub use components::{
    AnimatedModel, AnimationTrack, CollisionLayer, CollisionShape, Component, Light, RigidBody, Skybox, StaticModel,
    Terrain, Zone,
};
pub use persistence::{SceneIoError, SceneStore};
pub use scene_graph::{Node, NodeArena, NodeId, Scene};
