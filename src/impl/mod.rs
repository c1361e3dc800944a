// Crate-internal.
// ---

pub(crate) mod data {
    pub(crate) mod datasources {
        pub(crate) mod account_rows_csv_datasource;
        pub(crate) mod account_rows_json_datasource;
    }
    pub(crate) mod models {
        pub(crate) mod accounting_amount_model;
        pub(crate) mod raw_account_row_model;
        pub(crate) mod report_config_model;
    }
    pub(crate) mod repositories {
        pub(crate) mod account_rows_repository_impl;
    }
}

pub(crate) mod domain {
    pub(crate) mod entities {
        pub(crate) mod account_forest;
        pub(crate) mod account_record;
        pub(crate) mod expand_state;
        pub(crate) mod metrics;
        pub(crate) mod opening_balance_edit;
        pub(crate) mod report_config;
        pub(crate) mod report_view;
    }
    pub(crate) mod logic {
        pub(crate) mod display_projector;
        pub(crate) mod opening_balance_editor;
        pub(crate) mod rollup_aggregator;
        pub(crate) mod row_view;
        pub(crate) mod tree_builder;
        mod utils;
    }
    pub(crate) mod repositories {
        pub(crate) mod account_rows_repository;
        pub(crate) mod opening_balance_repository;
    }
    pub(crate) mod usecases {
        pub(crate) mod report_session_usecase;
    }
}

pub(crate) mod presentation {
    pub(crate) mod report_printer;
    pub(crate) mod utils;
}

// Public exports.
// ---

#[doc(hidden)]
#[allow(unused_imports)]
pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod entities {
        pub use crate::domain::entities::account_forest::*;
        pub use crate::domain::entities::account_record::*;
        pub use crate::domain::entities::expand_state::*;
        pub use crate::domain::entities::metrics::*;
        pub use crate::domain::entities::opening_balance_edit::*;
        pub use crate::domain::entities::report_config::*;
        pub use crate::domain::entities::report_view::*;
    }

    pub mod logic {
        pub use crate::domain::logic::display_projector::{display_value, DisplayProjector};
        pub use crate::domain::logic::rollup_aggregator::RollupAggregator;
        pub use crate::domain::logic::row_view::RowView;
        pub use crate::domain::logic::tree_builder::TreeBuilder;
    }

    pub mod repositories {
        pub use crate::data::repositories::account_rows_repository_impl::*;
        pub use crate::domain::repositories::account_rows_repository::*;
        pub use crate::domain::repositories::opening_balance_repository::*;
    }

    pub mod usecases {
        pub use crate::domain::usecases::report_session_usecase::*;
    }

    pub mod printer {
        pub use crate::presentation::report_printer::ReportPrinter;
    }
}
