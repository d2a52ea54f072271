fn main() {
    divvy_cli::cli::run();
}
