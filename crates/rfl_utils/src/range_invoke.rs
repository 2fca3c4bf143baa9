/// Invokes a macro once for every prefix of a list of `Type binding` pairs,
/// starting with the empty prefix.
///
/// Used to implement traits for every tuple arity up to the length of the
/// list. The binding is handed through so the callee can destructure the
/// tuple without generating indices.
///
/// # Example
///
/// ```ignore
/// range_invoke!(my_macro, [P0 p0, P1 p1, P2 p2]);
/// // expands to ↓
/// my_macro!();
/// my_macro!(P0 p0);
/// my_macro!(P0 p0, P1 p1);
/// my_macro!(P0 p0, P1 p1, P2 p2);
/// ```
#[macro_export]
macro_rules! range_invoke {
    ($macro:ident, [$($ty:ident $var:ident),* $(,)?]) => {
        $crate::range_invoke!(@munch $macro [] [$($ty $var),*]);
    };
    (@munch $macro:ident [$($ty:ident $var:ident),*] []) => {
        $macro!($($ty $var),*);
    };
    (@munch $macro:ident [$($ty:ident $var:ident),*] [$nty:ident $nvar:ident $(, $rty:ident $rvar:ident)*]) => {
        $macro!($($ty $var),*);
        $crate::range_invoke!(@munch $macro [$($ty $var,)* $nty $nvar] [$($rty $rvar),*]);
    };
}
