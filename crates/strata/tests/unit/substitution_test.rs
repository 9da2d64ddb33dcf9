//! Tests for substitution blocks and woven unit sources
//!
//! `tests/fixtures/greeter.rs` is one unit source compiled three times: once
//! against the real `words` layer, once against a partial substitution and
//! once against a substitution with no fall-through.

mod real {
    mod vocabulary {
        strata::unit! {
            words;

            pub fn salutation() -> &'static str {
                "Hello"
            }

            pub fn parting() -> &'static str {
                "Goodbye"
            }
        }
    }

    strata::layers! {
        pub words: vocabulary;
        pub greeter: greeter_unit;
    }

    strata::weave! { mod greeter_unit = "tests/fixtures/greeter.rs"; }
}

mod mocked {
    strata::substitute! {
        super::real::words {
            pub fn salutation() -> &'static str {
                "Ahoy"
            }
        }
    }

    strata::weave! { pub mod greeter_unit = "tests/fixtures/greeter.rs"; }
}

mod standalone {
    strata::substitute! {
        words {
            pub fn salutation() -> &'static str {
                shout("hi")
            }

            pub fn parting() -> &'static str {
                "Bye"
            }

            fn shout(word: &'static str) -> &'static str {
                if word == "hi" { "HI" } else { word }
            }
        }
    }

    strata::weave! { pub mod greeter_unit = "tests/fixtures/greeter.rs"; }
}

#[test]
fn test_real_unit_sees_real_layer() {
    assert_eq!(real::greeter::greet("Ann"), "Hello, Ann!");
    assert_eq!(real::greeter::farewell("Ann"), "Goodbye, Ann.");
}

#[test]
fn test_woven_unit_sees_replacement() {
    assert_eq!(
        mocked::greeter_unit::greeter_test::greet("Ann"),
        "Ahoy, Ann!"
    );
}

#[test]
fn test_unsubstituted_symbols_fall_through() {
    assert_eq!(mocked::words::parting(), "Goodbye");
    assert_eq!(
        mocked::greeter_unit::greeter_test::farewell("Ann"),
        "Goodbye, Ann."
    );
}

#[test]
fn test_substitution_does_not_leak_into_real_layer() {
    assert_eq!(mocked::words::salutation(), "Ahoy");
    assert_eq!(real::words::salutation(), "Hello");
    assert_eq!(real::words_test::salutation(), "Hello");
}

#[test]
fn test_single_name_target_has_no_fall_through() {
    assert_eq!(
        standalone::greeter_unit::greeter_test::greet("Ann"),
        "HI, Ann!"
    );
    assert_eq!(
        standalone::greeter_unit::greeter_test::farewell("Ann"),
        "Bye, Ann."
    );
}
