fn main() {
    scopewatch::app::startup::startup();
}
