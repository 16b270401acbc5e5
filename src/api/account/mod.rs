//
//  titan-cli
//  api/account/mod.rs
//
//  Created by Ngonidzashe Mangudya on 2026/01/12.
//  Copyright (c) 2025 IAMNGONI. All rights reserved.
//

//! Account resources: the authenticated user, companies, subscriptions,
//! API tokens, SSH keys and the event history.

pub mod companies;
pub mod history;
pub mod ssh_keys;
pub mod subscriptions;
pub mod tokens;
pub mod users;

pub use companies::*;
pub use history::*;
pub use ssh_keys::*;
pub use subscriptions::*;
pub use tokens::*;
pub use users::*;
