//! Domain models shared across crates

pub mod actor;
pub mod engineer;
pub mod notification;
pub mod repair_request;
pub mod serde_helpers;

pub use actor::{Actor, ActorRole};
pub use engineer::{Availability, Engineer, EngineerCreate, EngineerUpdate};
pub use notification::{EmailLog, EmailMessage, NotificationKind, SendStatus};
pub use repair_request::{
    BookingCreate, CompletionReport, CustomerInfo, DeviceInfo, PaymentMethod, PaymentRecord,
    RepairRequest, RequestStatus,
};
