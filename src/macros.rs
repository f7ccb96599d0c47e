/// Generate read-only accessors over fields of the global signal table.
///
/// Views subscribe through these; only `publish_workspace` writes.
///
/// Usage:
/// `read_signals! {
///     pub boards => boards: Vec<BoardSummary>,
///     notice => notice: Option<Notice>,
/// }`
#[macro_export]
macro_rules! read_signals {
    ( $( $vis:vis $name:ident => $field:ident : $ty:ty ),+ $(,)? ) => {
        $(
            $vis fn $name() -> ::leptos::ReadSignal<$ty> {
                $crate::global_state::globals().$field.read_only()
            }
        )+
    };
}
