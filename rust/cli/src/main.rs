use std::process::exit;

fn main() {
    let args: Vec<String> = std::env::args().collect();
    let code = ramino_cli::run(
        args,
        &mut std::io::stdout().lock(),
        &mut std::io::stderr().lock(),
    );
    exit(code);
}
