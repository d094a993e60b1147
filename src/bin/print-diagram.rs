extern crate voronoi_fortune;

use voronoi_fortune::{Diagram, DiagramConfig, DiagramError, PrintlnLogger};

fn print_diagram<R, L>(diagram: &Diagram<R, L>) {
    println!("Sites:");
    for site in diagram.sites() {
        println!("    {}", site);
    }

    println!("Segments:");
    for segment in diagram.segments() {
        println!("    {}", segment);
    }
}

fn main() -> Result<(), DiagramError> {
    let mut diagram = DiagramConfig::new()
        .with_dimensions(100, 100)
        .with_regions(5)
        .with_seed(0)
        .build_with_logger(PrintlnLogger)?;

    print_diagram(&diagram);

    diagram.add_random_site()?;
    let removed = diagram.del_site()?;
    println!("Removed {}.", removed);

    print_diagram(&diagram);
    println!("End of program.");

    Ok(())
}
