// Creates the Error, ErrorKind, ResultExt, and Result types.
// Construction, I/O and checked coordinate lookups fail with these; other contract
// violations (bad coordinates passed to accessors, mismatched grids) panic instead.
use error_chain::*;

error_chain! {

    foreign_links {
        Alloc(::std::collections::TryReserveError);
        Io(::std::io::Error);
        Image(::image::ImageError);
    }

    errors {
        DimensionsOverflow(width: usize, height: usize) {
            description("grid dimensions overflow the addressable cell count")
            display("grid dimensions {}x{} overflow the addressable cell count", width, height)
        }
        ImageTooLarge(width: usize, height: usize) {
            description("image dimensions are too large")
            display("a {}x{} pixel image is too large to encode", width, height)
        }
        CoordOutsideGrid(x: isize, y: isize, width: usize, height: usize) {
            description("coordinate is outside the grid")
            display("({}, {}) is outside the {}x{} grid", x, y, width, height)
        }
    }
}
