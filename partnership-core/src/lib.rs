pub use account::Account;
pub use allocate::allocate;
pub use error::AllocationError;
pub use journal::{Journal, JournalLine, Unannotated};
pub use posting::{Posting, RealPosting, VirtualPosting};
pub use spec::{PartnershipSpec, ResolvedSpec, Share};
pub use transaction::Transaction;

pub mod account;
pub mod allocate;
pub mod amount;
pub mod error;
pub mod journal;
pub mod posting;
pub mod spec;
pub mod transaction;
