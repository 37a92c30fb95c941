use std::hint::black_box;

fn main() {
    divan::main();
}

const SAMPLE: &str = "0:
###
##.
##.

1:
###
##.
.##

2:
.##
###
##.

3:
##.
###
##.

4:
###
#..
###

5:
###
.#.
###

4x4: 0 0 0 0 2 0
12x5: 1 0 1 0 2 2
12x5: 1 0 1 0 3 2";

#[divan::bench]
fn process_sample() -> String {
    tile_packing::process(black_box(SAMPLE)).unwrap()
}

#[divan::bench]
fn parse_sample() {
    black_box(tile_packing::parse::parse_input(black_box(SAMPLE)).unwrap());
}
