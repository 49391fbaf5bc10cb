//! Regression test parameters and operations

use crate::error::{TestError, TestResult};

/// Regression test mode
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum RegTestMode {
    /// Compare results and report failures (default)
    #[default]
    Compare,
    /// Also print every comparison as it is made
    Display,
}

impl RegTestMode {
    /// Parse mode from the `REGTEST_MODE` environment variable
    pub fn from_env() -> Self {
        match std::env::var("REGTEST_MODE")
            .unwrap_or_default()
            .to_lowercase()
            .as_str()
        {
            "display" => Self::Display,
            _ => Self::Compare,
        }
    }
}

/// Regression test parameters
///
/// Tracks the test name, the index of the current comparison, the mode and
/// every recorded failure.
pub struct RegParams {
    /// Name of the test (e.g., "rubine")
    pub test_name: String,
    /// Current test index (incremented before each comparison)
    index: usize,
    /// Test mode
    pub mode: RegTestMode,
    /// Overall success status
    success: bool,
    /// Recorded failures
    failures: Vec<String>,
}

impl RegParams {
    /// Create new regression test parameters
    ///
    /// # Arguments
    ///
    /// * `test_name` - Name of the test (e.g., "rubine")
    pub fn new(test_name: &str) -> Self {
        let mode = RegTestMode::from_env();

        eprintln!();
        eprintln!("////////////////////////////////////////////////");
        eprintln!("////////////////   {}_reg   ///////////////", test_name);
        eprintln!("////////////////////////////////////////////////");
        eprintln!("Mode: {:?}", mode);

        Self {
            test_name: test_name.to_string(),
            index: 0,
            mode,
            success: true,
            failures: Vec::new(),
        }
    }

    /// Get the current test index
    pub fn index(&self) -> usize {
        self.index
    }

    /// Check if in display mode
    pub fn display(&self) -> bool {
        self.mode == RegTestMode::Display
    }

    fn fail(&mut self, msg: String) -> bool {
        eprintln!("{}", msg);
        self.failures.push(msg);
        self.success = false;
        false
    }

    /// Compare two floating-point values
    ///
    /// # Arguments
    ///
    /// * `expected` - Expected value
    /// * `actual` - Actual computed value
    /// * `delta` - Maximum allowed difference
    ///
    /// # Returns
    ///
    /// `true` if values match within delta, `false` otherwise.
    pub fn compare_values(&mut self, expected: f64, actual: f64, delta: f64) -> bool {
        self.index += 1;
        match self.check_value(expected, actual, delta) {
            Ok(()) => {
                if self.display() {
                    eprintln!("  [{}] {} == {} (delta {})", self.index, actual, expected, delta);
                }
                true
            }
            Err(e) => {
                let msg = format!("Failure in {}_reg: {}", self.test_name, e);
                self.fail(msg)
            }
        }
    }

    fn check_value(&self, expected: f64, actual: f64, delta: f64) -> TestResult<()> {
        let diff = (expected - actual).abs();
        // NaN never matches
        if diff <= delta {
            Ok(())
        } else {
            Err(TestError::ValueMismatch {
                index: self.index,
                expected,
                actual,
                delta,
            })
        }
    }

    /// Compare two boolean conditions
    pub fn compare_bool(&mut self, expected: bool, actual: bool) -> bool {
        self.index += 1;
        if expected == actual {
            if self.display() {
                eprintln!("  [{}] {}", self.index, actual);
            }
            true
        } else {
            let msg = format!(
                "Failure in {}_reg: boolean comparison for index {}\n\
                 expected = {}, actual = {}",
                self.test_name, self.index, expected, actual
            );
            self.fail(msg)
        }
    }

    /// Compare two strings or byte arrays for exact equality
    ///
    /// # Returns
    ///
    /// `true` if the data is identical, `false` otherwise.
    pub fn compare_strings(&mut self, expected: impl AsRef<[u8]>, actual: impl AsRef<[u8]>) -> bool {
        self.index += 1;
        let (data1, data2) = (expected.as_ref(), actual.as_ref());

        if data1 != data2 {
            let msg = format!(
                "Failure in {}_reg: string comparison for index {}\n\
                 sizes: {} vs {}\n\
                 expected = {:?}, actual = {:?}",
                self.test_name,
                self.index,
                data1.len(),
                data2.len(),
                String::from_utf8_lossy(data1),
                String::from_utf8_lossy(data2)
            );
            self.fail(msg)
        } else {
            if self.display() {
                eprintln!("  [{}] {:?}", self.index, String::from_utf8_lossy(data2));
            }
            true
        }
    }

    /// Clean up and report results
    ///
    /// # Returns
    ///
    /// `true` if all tests passed, `false` if any failed.
    pub fn cleanup(self) -> bool {
        if self.success {
            eprintln!("SUCCESS: {}_reg", self.test_name);
        } else {
            eprintln!("FAILURE: {}_reg", self.test_name);
            for failure in &self.failures {
                eprintln!("  {}", failure);
            }
        }
        eprintln!();

        self.success
    }

    /// Report results as a `Result`
    ///
    /// # Errors
    ///
    /// Returns [`TestError::Failed`] if any comparison failed.
    pub fn finish(self) -> TestResult<()> {
        let count = self.failures.len();
        let test = self.test_name.clone();
        if self.cleanup() {
            Ok(())
        } else {
            Err(TestError::Failed { test, count })
        }
    }

    /// Check if all tests have passed so far
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Get list of failures
    pub fn failures(&self) -> &[String] {
        &self.failures
    }
}
