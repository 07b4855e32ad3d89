#[path = "../test_utils.rs"]
mod test_utils;

mod alerts_test;
mod booking_test;
mod middleware_test;
mod reports_test;
