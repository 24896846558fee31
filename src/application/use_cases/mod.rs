pub mod clean_estoque;
pub mod clean_saude;
pub mod clean_vendas;
pub mod import_pipeline;
pub mod validate;
