//
//  titan-cli
//  api/compute/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Compute resources: servers, snapshots, networks and what hangs off them.

pub mod drp;
pub mod firewall;
pub mod ips;
pub mod networks;
pub mod pnat;
pub mod rotation;
pub mod servers;
pub mod snapshots;
pub mod templates;

pub use drp::*;
pub use firewall::*;
pub use ips::*;
pub use networks::*;
pub use pnat::*;
pub use rotation::*;
pub use servers::*;
pub use snapshots::*;
pub use templates::*;
