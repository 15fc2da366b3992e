use std::fmt::{self, Display, Formatter};

use schema::{Field, ValidationError};

use crate::{controller::ResultState, form::FormFields};

impl Display for ResultState {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            ResultState::Empty => {
                writeln!(f, "Ready for Analysis")?;
                write!(
                    f,
                    "Enter your information and click \"Predict\" or press \"Enter\" to see the result"
                )
            }
            ResultState::Loading => {
                writeln!(f, "Analyzing Data")?;
                write!(f, "Processing your information...")
            }
            ResultState::Success(result) => {
                writeln!(f, "Prediction Generated Successfully")?;
                writeln!(f, "Prediction Result: {}", result.prediction)?;
                write!(f, "Based on your age and salary information")
            }
            ResultState::Error(message) => {
                writeln!(f, "Prediction Failed")?;
                writeln!(f, "{message}")?;
                write!(f, "[Try Again]")
            }
        }
    }
}

/// Form fields with the inline message under each invalid one.
pub struct FormView<'a> {
    pub form: &'a FormFields,
    pub errors: Option<&'a ValidationError>,
}

impl FormView<'_> {
    fn field(
        &self,
        f: &mut Formatter<'_>,
        label: &str,
        value: &str,
        field: Field,
    ) -> fmt::Result {
        writeln!(f, "{label:<14}{value}")?;

        if let Some(message) = self.errors.and_then(|errors| errors.message_for(field)) {
            writeln!(f, "  ! {message}")?;
        }

        Ok(())
    }
}

impl Display for FormView<'_> {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.field(f, "Age", self.form.age(), Field::Age)?;
        self.field(f, "Annual Salary", &self.form.salary_display(), Field::Salary)?;
        self.field(f, "API Endpoint", self.form.api_url(), Field::ApiUrl)
    }
}
