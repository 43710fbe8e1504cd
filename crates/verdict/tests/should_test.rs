//! Failure messages resolved against this very file

use pretty_assertions::assert_eq;
use std::panic::{catch_unwind, AssertUnwindSafe};
use std::sync::Arc;
use verdict::{
    context_from_config, given, AssertionContext, MessageFormatter, Overrides, Should,
};
use verdict_core::config::Config;
use verdict_core::current_test_name;

fn message_of(check: impl FnOnce()) -> String {
    let payload = catch_unwind(AssertUnwindSafe(check)).expect_err("check should have failed");
    match payload.downcast::<String>() {
        Ok(message) => *message,
        Err(_) => panic!("panic payload is not a failure message"),
    }
}

struct Order {
    total: i64,
    customer: String,
}

#[test]
fn test_failure_names_local_variable() {
    let order_total = 41;

    let message = message_of(|| {
        order_total.should().be(42);
    });

    assert_eq!(message, "order_total\nis 41\nbut was expected\nto be 42");
}

#[test]
fn test_failure_names_field_chain() {
    let order = Order {
        total: 99,
        customer: "ada".to_string(),
    };

    let message = message_of(|| {
        order.total.should().be_less_than(50);
    });
    assert_eq!(message, "order.total\nis 99\nbut was expected\nto be less than 50");

    let message = message_of(|| {
        order.customer.clone().should().start_with("bob");
    });
    assert!(message.starts_with("order.customer.clone\nis \"ada\""));
}

#[test]
#[rustfmt::skip]
fn test_ambiguous_line_uses_expected_value() {
    let first = 1;
    let second = 3;

    let message = message_of(|| {
        first.should().be(1); second.should().be(2);
    });

    assert_eq!(message, "second\nis 3\nbut was expected\nto be 2");
}

#[test]
fn test_sequence_check_and_reason() {
    let reading = 25;

    let message = message_of(|| {
        reading.should().because("sensor is calibrated").be_between(10, 20);
    });

    assert_eq!(
        message,
        "reading\nis 25\nbut was expected\nto be between 10 and 20\nbecause sensor is calibrated"
    );
}

#[test]
fn test_passing_checks_return_values() {
    let total = 42.should().be(42);
    let name = Some("ada").should().be_some();

    assert_eq!(total, 42);
    assert_eq!(name, "ada");
}

struct Bracketed;

impl MessageFormatter for Bracketed {
    fn format(
        &self,
        context: Option<&str>,
        actual: &str,
        expected: &str,
        _reason: Option<&str>,
    ) -> String {
        format!("[{}] {actual} / {expected}", context.unwrap_or("?"))
    }
}

#[test]
fn test_scenario_with_per_test_formatter() {
    let overrides = Overrides::new(context_from_config(&Config::default()));
    overrides.bind_formatter_for(&current_test_name(), Arc::new(Bracketed));

    given(|| vec![2, 3])
        .with_overrides(&overrides)
        .when(|items| items.iter().sum::<i32>())
        .then(|total, ctx| {
            let message = message_of(|| {
                total.should_with(ctx).be(6);
            });
            assert_eq!(message, "[total] 5 / to be 6");
        });

    overrides.reset_for(&current_test_name());
    let context: AssertionContext = overrides.context_for(&current_test_name());
    let message = message_of(|| {
        7.should_with(&context).be(8);
    });
    assert_eq!(message, "is 7\nbut was expected\nto be 8");
}

#[derive(Debug, PartialEq)]
struct PaymentDeclined {
    code: u16,
}

#[test]
fn test_then_throw_returns_expected_payload() {
    let declined = given(|| 402u16)
        .when(|code| -> u32 { std::panic::panic_any(PaymentDeclined { code }) })
        .then_throw::<PaymentDeclined, u32>();

    declined.code.should().be(402);
}

#[test]
fn test_then_throw_lets_other_panics_through() {
    let result = catch_unwind(|| {
        given(|| ())
            .when(|_| -> u32 { panic!("database offline") })
            .then_throw::<PaymentDeclined, u32>()
    });

    let payload = result.expect_err("unrelated panic should propagate");
    assert_eq!(payload.downcast_ref::<&str>(), Some(&"database offline"));
}
