fn main() {
    // ESP-IDF link arguments are only relevant when the firmware feature
    // set is enabled; host test builds (--no-default-features) must not
    // require an ESP toolchain.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
