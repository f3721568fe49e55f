pub mod album {
    pub mod handle;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod route;
    pub mod schema;
    pub mod service;
}
pub mod customer {
    pub mod handle;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod route;
    pub mod schema;
    pub mod service;
}
pub mod media;
pub mod photo {
    pub mod handle;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod route;
    pub mod schema;
    pub mod service;
}
pub mod user {
    pub mod handle;
    pub mod model;
    pub mod repository;
    pub mod repository_pg;
    pub mod route;
    pub mod schema;
    pub mod service;
}
