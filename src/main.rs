use rusty_intersect::benchmark;

fn main() {
    benchmark::benchmark_intersections();
}
