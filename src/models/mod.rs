pub mod customer_status;

#[allow(unused_imports)]
pub mod prelude {
    pub use super::customer_status::{self, Entity as CustomerStatus};
}
