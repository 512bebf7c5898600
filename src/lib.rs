pub mod application {
    pub mod use_cases {
        pub mod report_user_activity;
    }
}

pub mod domain {
    pub mod errors;
    pub mod external_apis {
        pub mod github;
    }
    pub mod models {
        pub mod activity;
    }
}

pub mod infrastructures {
    pub mod adapters {
        pub mod primary {
            pub mod cli;
        }
        pub mod secondary {
            pub mod external_apis {
                pub mod github;
            }
        }
    }
}
