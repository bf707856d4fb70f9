pub mod p900_sales_product_report;
