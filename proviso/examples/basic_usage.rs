//! Basic usage examples demonstrating the core Proviso API
//!
//! Each example runs one property and prints either the passing report or
//! the shrunk counterexample. Set `RUST_LOG=proviso=debug` to watch trials
//! and shrink steps.

use proviso::{
    Arbitrary, CheckError, Config, Fun, GenContext, Report, Runner, Shrink, prop_assert, skip,
};
use tracing_subscriber::EnvFilter;

fn print_result<T: std::fmt::Debug>(name: &str, result: Result<Report, CheckError<T>>) {
    println!("=== {} ===", name);
    match result {
        Ok(report) => println!("{}\n", report),
        Err(err) => println!("{}\n", err),
    }
}

// Example 1: a property that holds
fn example_1_associativity(runner: &Runner) {
    let result = runner.run(&|a: i32, b: i32, c: i32| (a + b) + c == a + (b + c));
    print_result("integer addition is associative", result);
}

// Example 2: a property that fails and is shrunk
fn example_2_pair(runner: &Runner) {
    let result = runner.run(&|pair: (i32, u32)| pair.0 >= 0);
    print_result("first component is never negative", result);
}

// Example 3: floats are not associative
fn example_3_floats(runner: &Runner) {
    let result = runner.run(&|a: f32, b: f32, c: f32| (a + b) + c == a + (b + c));
    print_result("float addition is associative", result);
}

// Example 4: skipping inputs the property does not judge
fn example_4_skip(runner: &Runner) {
    let result = runner.run(&|x: i32| {
        if x % 2 != 0 {
            skip();
        }
        prop_assert!(x % 2 == 0, "{} is odd", x);
    });
    print_result("even inputs are even", result);
}

// Example 5: custom types
#[derive(Debug, Clone, Arbitrary, Shrink)]
struct Custom {
    a: i32,
    b: i32,
    #[arbitrary(with = always_true)]
    c: bool,
}

fn always_true(_: &mut GenContext) -> bool {
    true
}

fn example_5_custom(runner: &Runner) {
    let result = runner.run(&|custom: Custom| custom.c);
    print_result("custom generator sets the flag", result);
}

// Example 6: synthesized functions
fn example_6_functions(runner: &Runner) {
    let result = runner.run(&|f: Fun<(i32, i32), i32>, a: i32, b: i32| {
        f.call(&(a, b)) == f.call(&(b, a))
    });
    print_result("every function is commutative", result);
}

fn main() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();

    let config = match Config::default().with_env_overrides() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("{}", err);
            std::process::exit(2);
        }
    };
    let runner = Runner::new(config);

    example_1_associativity(&runner);
    example_2_pair(&runner);
    example_3_floats(&runner);
    example_4_skip(&runner);
    example_5_custom(&runner);
    example_6_functions(&runner);
}
