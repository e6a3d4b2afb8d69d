//! # Services
//!
//! Business operations over the record store.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                              Services                                   │
//! │                                                                         │
//! │  AccountService    register, authenticate, set/toggle active, remove   │
//! │  InventoryService  add, edit, remove, search, list                     │
//! │  SalesService      purchase (one exclusive section, one save)          │
//! │  ReportService     summary, top accounts, invoices (read only)         │
//! │                                                                         │
//! │  Each holds Arc<RecordStore>; cloning a service is cheap.               │
//! │  None checks role permissions. The caller that knows the logged-in     │
//! │  account does that with Role::allows before calling in.                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

pub mod account;
pub mod inventory;
pub mod report;
pub mod sales;

pub use account::AccountService;
pub use inventory::InventoryService;
pub use report::{ReportService, Summary};
pub use sales::SalesService;
