use anchor_lang::prelude::*;
use anchor_lang::error::Error;
use crate::errors::SaleError;

/// Assert that `result` failed with the given program error
#[track_caller]
pub fn assert_sale_error<T: std::fmt::Debug>(result: Result<T>, expected: SaleError) {
    match result {
        Err(Error::AnchorError(err)) => {
            assert_eq!(err.error_code_number, u32::from(expected), "{}", err.error_msg)
        }
        other => panic!("expected {:?}, got {:?}", expected, other),
    }
}
