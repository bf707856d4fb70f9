pub mod a001_product;
pub mod a002_category;
pub mod a003_attribute;
pub mod a004_supplier;
pub mod a005_order;
