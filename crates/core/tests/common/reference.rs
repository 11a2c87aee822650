use tomasim_core::RegClass;
use tomasim_core::core::RegisterFile;
use tomasim_core::Instruction;

/// Executes `program` one instruction at a time, in order, from the preset
/// register values. Out-of-order execution must end in the same state.
pub fn run_in_order(program: &[Instruction]) -> (RegisterFile, RegisterFile) {
    let mut fp = RegisterFile::with_defaults(RegClass::Float);
    let mut int = RegisterFile::with_defaults(RegClass::Int);
    for inst in program {
        let file = match inst.op.reg_class() {
            RegClass::Float => &mut fp,
            RegClass::Int => &mut int,
        };
        let result = inst.op.compute(file.read(inst.src1), file.read(inst.src2));
        file.write(inst.dest, result);
    }
    (fp, int)
}
