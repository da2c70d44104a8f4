//! Entity module - Contains all SeaORM entity definitions for the database.
//! These entities represent the database tables and their relationships.
//! Each entity has a Model struct for data and an Entity struct for operations.

pub mod calendar_event;
pub mod client;
pub mod expense;
pub mod payment;
pub mod role;
pub mod sale;
pub mod sequence;
pub mod session;
pub mod user;

// Re-export specific types to avoid conflicts
pub use calendar_event::{
    Column as CalendarEventColumn, Entity as CalendarEvent, Model as CalendarEventModel,
};
pub use client::{Column as ClientColumn, Entity as Client, Model as ClientModel};
pub use expense::{Column as ExpenseColumn, Entity as Expense, Model as ExpenseModel};
pub use payment::{Column as PaymentColumn, Entity as Payment, Model as PaymentModel};
pub use role::{Column as RoleColumn, Entity as Role, Model as RoleModel};
pub use sale::{Column as SaleColumn, Entity as Sale, Model as SaleModel};
pub use sequence::{Column as SequenceColumn, Entity as Sequence, Model as SequenceModel};
pub use session::{Column as SessionColumn, Entity as Session, Model as SessionModel};
pub use user::{Column as UserColumn, Entity as User, Model as UserModel};
