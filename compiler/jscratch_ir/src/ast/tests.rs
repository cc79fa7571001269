use super::*;

#[test]
fn compound_assignment_maps_to_binary() {
    assert_eq!(AssignOp::Assign.binary(), None);
    assert_eq!(AssignOp::Add.binary(), Some(BinaryOp::Add));
    assert_eq!(AssignOp::Rem.binary(), Some(BinaryOp::Rem));
    assert_eq!(AssignOp::Div.as_symbol(), "/=");
}

#[test]
fn operator_symbols() {
    assert_eq!(BinaryOp::UShr.as_symbol(), ">>>");
    assert_eq!(BinaryOp::Rem.as_symbol(), "%");
    assert_eq!(UnaryOp::PostInc.as_symbol(), "++");
    assert!(UnaryOp::PreDec.is_step());
    assert!(!UnaryOp::Neg.is_step());
    assert!(BinaryOp::GtEq.is_relational());
    assert!(BinaryOp::Shr.is_shift());
}

#[test]
fn float_literals_compare_by_bits() {
    assert_eq!(Literal::double(1.5), Literal::double(1.5));
    assert_ne!(Literal::float(0.0), Literal::float(-0.0));
}

#[test]
fn unsupported_names() {
    assert_eq!(UnsupportedStmt::Continue.as_str(), "continue");
    assert_eq!(UnsupportedStmt::ClassDecl.as_str(), "class declaration");
}
