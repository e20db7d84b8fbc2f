/// Build an [`Origin`](crate::Origin) for the current call site.
///
/// `origin!()` names the enclosing function (`my_app::orders:place`);
/// `origin!("name")` pairs the current module path with an explicit
/// operation name.
///
/// ```
/// fn place_order() -> tracefile::Origin {
///     tracefile::origin!()
/// }
///
/// assert_eq!(place_order().operation, "place_order");
/// assert_eq!(tracefile::origin!("startup").operation, "startup");
/// ```
#[macro_export]
macro_rules! origin {
    () => {{
        fn __origin_marker() {}
        fn __type_name_of<T>(_: T) -> &'static str {
            ::std::any::type_name::<T>()
        }
        let name = __type_name_of(__origin_marker);
        $crate::Origin::from_path(name.strip_suffix("::__origin_marker").unwrap_or(name))
    }};
    ($operation:expr) => {
        $crate::Origin::new(::std::module_path!(), $operation)
    };
}

/// Implement [`Loggable`](crate::Loggable) for a struct by listing the
/// fields to log, in the order they should appear.
///
/// ```
/// struct Order {
///     id: u64,
///     customer: String,
/// }
///
/// tracefile::loggable!(Order { id, customer });
/// ```
#[macro_export]
macro_rules! loggable {
    ($ty:ty { $($field:ident),* $(,)? }) => {
        impl $crate::Loggable for $ty {
            #[allow(unused_variables)]
            fn describe(&self, visit: &mut dyn $crate::Visit) {
                $( visit.visit_member(::std::stringify!($field), &self.$field); )*
            }
        }
    };
}
