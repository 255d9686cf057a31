use super::definition::Funnel;
use crate::error::SchemaError;

/// A trait for sources that can be turned into an annai [`Funnel`].
///
/// This is the extension point for custom schema formats. JSON text and
/// `serde_json::Value` documents are supported out of the box; implement the
/// trait on your own structs to translate a different authoring format.
///
/// # Example
///
/// ```rust,no_run
/// use annai::error::{ConversionError, SchemaError};
/// use annai::funnel::{EndStep, Funnel, IntoFunnel, Step};
///
/// // A format that only knows a linear list of end screens.
/// struct Slides { titles: Vec<String> }
///
/// impl IntoFunnel for Slides {
///     fn into_funnel(self) -> Result<Funnel, SchemaError> {
///         let first = self.titles.first().ok_or_else(|| {
///             ConversionError::ValidationError("at least one slide is required".into())
///         })?;
///         let mut funnel = Funnel {
///             start: first.clone(),
///             ..Default::default()
///         };
///         for title in self.titles {
///             let step = Step::End(EndStep { title: Some(title.clone()), body: None });
///             funnel.steps.insert(title, step);
///         }
///         Ok(funnel)
///     }
/// }
/// ```
pub trait IntoFunnel {
    /// Consumes the object and converts it into a funnel definition.
    fn into_funnel(self) -> Result<Funnel, SchemaError>;
}

impl IntoFunnel for Funnel {
    fn into_funnel(self) -> Result<Funnel, SchemaError> {
        Ok(self)
    }
}

impl IntoFunnel for serde_json::Value {
    fn into_funnel(self) -> Result<Funnel, SchemaError> {
        Funnel::from_value(self)
    }
}

impl IntoFunnel for &str {
    fn into_funnel(self) -> Result<Funnel, SchemaError> {
        Funnel::from_json(self)
    }
}
