pub mod banks;
pub mod emi;
pub mod sensitivity;
