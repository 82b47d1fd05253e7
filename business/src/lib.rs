pub mod application {
    pub mod expense {
        pub mod create;
        pub mod delete;
        pub mod list;
        pub mod summarize;
        pub mod update;
    }
    pub mod receipt {
        pub mod extract;
    }
}

pub mod domain {
    pub mod errors;
    pub mod logger;
    pub mod shared {
        pub mod amount;
        pub mod category;
        pub mod value_objects;
    }
    pub mod expense {
        pub mod date_range;
        pub mod errors;
        pub mod model;
        pub mod repository;
        pub mod summary;
        pub mod use_cases {
            pub mod create;
            pub mod delete;
            pub mod list;
            pub mod summarize;
            pub mod update;
        }
    }
    pub mod receipt {
        pub mod errors;
        pub mod model;
        pub mod parser;
        pub mod prompt;
        pub mod services;
        pub mod use_cases {
            pub mod extract;
        }
    }
}
