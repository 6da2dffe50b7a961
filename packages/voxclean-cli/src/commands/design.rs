use crate::cli::DesignArgs;
use crate::exit_codes;
use crate::output;
use serde::Serialize;
use voxclean::{ButterworthFilter, FilterCoefficients, FilterSpec};

#[derive(Serialize)]
struct DesignOutput {
    #[serde(flatten)]
    spec: FilterSpec,
    #[serde(flatten)]
    coefficients: FilterCoefficients,
}

pub fn execute(args: DesignArgs) -> i32 {
    let spec = FilterSpec::new(args.lowcut, args.highcut, args.sample_rate, args.order);

    let coefficients = match ButterworthFilter::bandpass(&spec) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Error: {}", e);
            return exit_codes::INPUT_ERROR;
        }
    };

    if args.json {
        let result = DesignOutput { spec, coefficients };
        if let Err(e) = output::print_json(&result, args.compact) {
            eprintln!("Error: {}", e);
            return exit_codes::EXECUTION_ERROR;
        }
    } else {
        println!(
            "Butterworth bandpass {}-{} Hz @ {} Hz, order {} ({} taps)",
            spec.lowcut,
            spec.highcut,
            spec.sample_rate,
            spec.order,
            coefficients.b().len()
        );
        println!();
        println!("  {:<4} {:>24} {:>24}", "k", "b[k]", "a[k]");
        println!("  {}", "-".repeat(54));
        for (k, (b, a)) in coefficients.b().iter().zip(coefficients.a()).enumerate() {
            println!("  {:<4} {:>24.16e} {:>24.16e}", k, b, a);
        }
    }

    exit_codes::SUCCESS
}
