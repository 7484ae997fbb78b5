/// Declares a closed string vocabulary: a fieldless enum that serializes to
/// its label, lists its labels, and validates against them.
macro_rules! closed_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident as $kind:literal {
            $($variant:ident => $label:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
        $vis enum $name {
            $(
                #[serde(rename = $label)]
                $variant,
            )+
        }

        impl $name {
            pub const ALL: &'static [$name] = &[$($name::$variant),+];
            pub const LABELS: &'static [&'static str] = &[$($label),+];
            pub const KIND: &'static str = $kind;

            pub fn as_str(&self) -> &'static str {
                match self {
                    $($name::$variant => $label,)+
                }
            }

            pub fn from_label(text: &str) -> Option<Self> {
                match text {
                    $($label => Some($name::$variant),)+
                    _ => None,
                }
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.pad(self.as_str())
            }
        }

        impl $crate::validate::Schema for $name {
            fn validate(
                value: &serde_json::Value,
                cx: &mut $crate::validate::Context<'_>,
            ) -> Option<Self> {
                let text = cx.string(value)?;
                match Self::from_label(text) {
                    Some(v) => Some(v),
                    None => {
                        cx.constraint(
                            format!("one of the {} {} values", Self::ALL.len(), Self::KIND),
                            value,
                        );
                        None
                    }
                }
            }
        }
    };
}
