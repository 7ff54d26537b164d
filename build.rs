fn main() {
    // ESP-IDF environment only when building the firmware; host test builds
    // have no toolchain to point at.
    #[cfg(feature = "espidf")]
    embuild::espidf::sysenv::output();
}
