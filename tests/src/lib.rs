mod db_test;
pub use db_test::DbTest;

pub use logging_driver::{DriverOp, Faults, LoggingDriver};

mod resource;
pub use resource::Resource;

pub use std_util::prelude::*;

/// Declares async test functions taking `&mut DbTest`, each run on its own
/// runtime against a fresh database.
#[macro_export]
macro_rules! tests {
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident
        ),+
    ) => {
        #[cfg(feature = "sqlite")]
        mod sqlite {
            $(
                #[test]
                $( #[$attrs] )*
                fn $f() {
                    $crate::DbTest::runtime().block_on(async {
                        let mut test = $crate::DbTest::new();
                        super::$f(&mut test).await;
                    });
                }
            )*
        }
    };
    (
        $(
            $( #[$attrs:meta] )*
            $f:ident,
        )+
    ) => {
        $crate::tests!( $(
            $( #[$attrs] )*
            $f
        ),+ );
    }
}
