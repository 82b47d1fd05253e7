pub mod db;
pub mod expense {
    pub mod entity;
    pub mod repository;
}
