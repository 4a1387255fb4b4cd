fn main() {
    let matches = cabi_gen::cli().get_matches();
    cabi_gen::init_tracing(matches.get_flag("verbose"));

    if let Err(err) = cabi_gen::execute(&matches) {
        eprintln!("error: {err:#}");
        std::process::exit(1);
    }
}
