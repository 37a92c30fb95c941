use miette::*;

fn main() -> Result<()> {
    tracing_subscriber::fmt::init();
    let path = std::env::args()
        .nth(1)
        .ok_or_else(|| miette!("usage: solve <input-file>"))?;
    let input = std::fs::read_to_string(&path)
        .into_diagnostic()
        .wrap_err_with(|| format!("reading {path}"))?;
    let result = tile_packing::process(&input)?;
    println!("Result: {}", result);
    Ok(())
}
