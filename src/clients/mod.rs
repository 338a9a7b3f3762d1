pub mod brand_client;
