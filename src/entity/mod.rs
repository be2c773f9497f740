pub mod categories;
pub mod item_categories;
pub mod items;
pub mod order_details;
pub mod orders;
pub mod users;

pub use categories::Entity as Categories;
pub use item_categories::Entity as ItemCategories;
pub use items::Entity as Items;
pub use order_details::Entity as OrderDetails;
pub use orders::Entity as Orders;
pub use users::Entity as Users;
