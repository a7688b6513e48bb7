//! UI Components
//!
//! Screens, sheets and shared list pieces.

mod activity_list;
mod bottom_nav;
mod bottom_sheet;
mod cart_review;
mod filter_sheet;
mod installment_list;
mod list_view;
mod merchandise_list;
mod payment_sheet;
mod support_view;

pub use activity_list::ActivityList;
pub use bottom_nav::{BottomNav, NoticeBanner};
pub use bottom_sheet::BottomSheet;
pub use cart_review::CartReviewSheet;
pub use installment_list::InstallmentList;
pub use merchandise_list::MerchandiseList;
pub use payment_sheet::PaymentSheet;
pub use support_view::SupportView;
