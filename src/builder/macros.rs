//! Macros for ergonomic screen definitions.

/// Generate a screen enum and its `Screen` implementation.
///
/// Variants named in the optional `consumes_back` list swallow back presses
/// (see [`Screen::on_back_pressed`](crate::core::Screen::on_back_pressed)).
///
/// # Example
///
/// ```
/// use backstack::core::Screen;
/// use backstack::screen_enum;
///
/// screen_enum! {
///     pub enum AppScreen {
///         Notes,
///         EditNote,
///         Drawer,
///     }
///     consumes_back: [Drawer]
/// }
///
/// assert_eq!(AppScreen::EditNote.name(), "EditNote");
/// assert!(AppScreen::Drawer.on_back_pressed());
/// ```
#[macro_export]
macro_rules! screen_enum {
    (
        $(#[$meta:meta])*
        $vis:vis enum $name:ident {
            $(
                $(#[$variant_meta:meta])*
                $variant:ident
            ),* $(,)?
        }

        $(consumes_back: [$($consumes:ident),* $(,)?])?
    ) => {
        $(#[$meta])*
        #[derive(Clone, Copy, PartialEq, Eq, Hash, Debug)]
        $vis enum $name {
            $(
                $(#[$variant_meta])*
                $variant
            ),*
        }

        impl $crate::core::Screen for $name {
            fn name(&self) -> &str {
                match self {
                    $(Self::$variant => stringify!($variant)),*
                }
            }

            fn on_back_pressed(&self) -> bool {
                match self {
                    $($(Self::$consumes => true,)*)?
                    #[allow(unreachable_patterns)]
                    _ => false,
                }
            }
        }
    };
}
