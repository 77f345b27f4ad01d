// tests that Clone, Debug, and PartialEq are implemented for a value type
#[macro_export]
macro_rules! test_basic_impls {
    ($x: expr) => {
        #[test]
        fn should_impl_debug_clone_and_partialeq() {
            let x = $x;
            assert_eq!(x, x.clone());
            let _s = format!("{:?}", x);
        }
    };
}
