fn main() {
    // ESP-IDF sysenv propagation is only meaningful when building the
    // on-device binary; host-target test builds skip it.
    if std::env::var("CARGO_FEATURE_ESPIDF").is_ok() {
        embuild::espidf::sysenv::output();
    }
}
