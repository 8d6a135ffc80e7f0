//
//  listmonk-ops
//  api/services/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Namespaces that are not one of the five CRUD resources.
//!
//! | Namespace | Operations |
//! |-----------|------------|
//! | [`Import`] | `start`, `stop`, `status`, `logs` |
//! | [`Bounces`] | `list`, `get`, `delete`, `delete_by_id` |
//! | [`Transactional`] | `send` |
//! | [`Settings`] | `get`, `update`, `test_smtp` |
//! | [`Dashboard`] | `charts`, `counts` |
//! | [`System`] | `config`, `logs`, `reload`, `health` |
//!
//! Every operation name is resolved when the client is built; calls never
//! look the table up again.

pub mod bounces;
pub mod dashboard;
pub mod import;
pub mod settings;
pub mod system;
pub mod transactional;

pub use bounces::{Bounce, BounceSelection, Bounces};
pub use dashboard::Dashboard;
pub use import::{Import, ImportMode, ImportParams};
pub use settings::Settings;
pub use system::System;
pub use transactional::{Transactional, TxMessage};
