// Crate-internal.
// ---

pub(crate) mod in_memory {
    pub(crate) mod in_memory_account_rows;
    pub(crate) mod in_memory_opening_balances;
}

pub(crate) mod screens {
    pub(crate) mod report_screens;
}

// Public exports.
// ---

pub mod exports {
    // This mod represents how clients see the library, and can differ from the
    // internal structure.
    //
    // The contents of this mod are re-exported in the root of the crate.

    pub mod in_memory {
        pub use crate::impl_ext::in_memory::in_memory_account_rows::*;
        pub use crate::impl_ext::in_memory::in_memory_opening_balances::*;
    }

    pub mod screens {
        pub use crate::impl_ext::screens::report_screens::*;
    }
}
