//! Canvas model and interaction engine for the NeatMemo whiteboard.
//!
//! This crate is pure logic: it owns the item collection for the open
//! project, the pan/zoom camera, hit-testing, and the gesture state machine
//! that turns raw pointer events into item mutations. It performs no I/O —
//! a host layer wires pointer events in, renders from [`store::ItemStore`],
//! and persists the [`engine::Action`]s that come back out (see the `client`
//! crate for the persistence half).
//!
//! ## Module layout
//!
//! | Module | Role |
//! |--------|------|
//! | [`engine`] | Top-level [`engine::EngineCore`] and host-facing [`engine::Action`]s |
//! | [`item`] | Canvas item variants (text, image, pen) and their wire records |
//! | [`project`] | Project metadata (id, name, timestamps) |
//! | [`store`] | In-memory item collection with z-order operations |
//! | [`camera`] | Pan/zoom camera and screen↔canvas coordinate conversions |
//! | [`input`] | Input event types and the gesture state machine |
//! | [`hit`] | Hit-testing a screen point against the item stack |
//! | [`menu`] | Context-menu and toolbar action dispatch |
//! | [`consts`] | Shared numeric constants (zoom limits, minimum sizes, etc.) |

pub mod camera;
pub mod consts;
pub mod engine;
pub mod hit;
pub mod input;
pub mod item;
pub mod menu;
pub mod project;
pub mod store;
