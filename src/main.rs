fn main() {
    std::process::exit(monitorstack::app::startup::startup());
}
