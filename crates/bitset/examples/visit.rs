use tracing_subscriber::EnvFilter;
use wordset::{BitSet, Options, bitset};

// This example builds a couple of sets, combines them, and walks the result. Run it with
// `RUST_LOG=wordset=trace` to see storage growth and trimming.
fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    // Multiples of three and of five below one hundred.
    let threes: BitSet = (0..100).step_by(3).collect();
    let fives: BitSet = (0..100).step_by(5).collect();

    let fizzbuzz = threes.intersect(&fives);
    let either = threes.union(&fives);
    let only_threes = threes.difference(&fives);
    eprintln!("both:   {fizzbuzz:?}");
    eprintln!("either: {} elements", either.len());
    eprintln!("threes: {} elements not divisible by five", only_threes.len());

    // Stop at the first element above fifty.
    let mut first = None;
    let aborted = either.visit(|n| {
        if n > 50 {
            first = Some(n);
            return true;
        }
        false
    });
    eprintln!("first above fifty: {first:?} (aborted: {aborted})");

    // Rejected elements are logged, not stored.
    let mut small = BitSet::with_options(Options::default().with_max_element(1_000));
    small.add(-1).add(5_000).add(999);
    eprintln!("small:  {small:?}");

    // Clearing the top element trims the storage.
    let mut sparse = bitset![1, 4_000];
    eprintln!("words before clear: {}", sparse.words().len());
    sparse.clear(4_000);
    eprintln!("words after clear:  {}", sparse.words().len());
}
