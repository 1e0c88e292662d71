use crate::components::*;
use reaction_editor::form::SectionKey;
use reaction_editor::sections::{
    ElectroForm, ElectroMeasurementForm, ElectroSignal, FlowForm, PressureForm,
    PressureMeasurementForm, StirringForm, TemperatureForm, TemperatureMeasurementForm,
};
use reaction_editor::ReactionForm;
use yew::prelude::*;

pub fn render_conditions(
    ctx: &EditorContext,
    reports: &Reports,
    root: &FormLens<ReactionForm>,
    form: &ReactionForm,
) -> Html {
    let conditions = root.section(SectionKey::Conditions, |f: &mut ReactionForm| Some(f));
    let temperature =
        conditions.section(SectionKey::Temperature, |f: &mut ReactionForm| Some(&mut f.temperature));
    let pressure =
        conditions.section(SectionKey::Pressure, |f: &mut ReactionForm| Some(&mut f.pressure));
    let stirring =
        conditions.section(SectionKey::Stirring, |f: &mut ReactionForm| Some(&mut f.stirring));
    let flow = conditions.section(SectionKey::Flow, |f: &mut ReactionForm| Some(&mut f.flow));
    let electro = conditions.section(SectionKey::Electrochemistry, |f: &mut ReactionForm| {
        Some(&mut f.electro)
    });
    html! {
        <div id={SectionKey::Conditions.anchor()} class="section">
            <h2>{ "Conditions" }</h2>
            { validate_box(reports, SectionKey::Conditions) }
            { subsection(reports, SectionKey::Temperature, "Temperature",
                temperature_fields(ctx, temperature, &form.temperature)) }
            { subsection(reports, SectionKey::Pressure, "Pressure",
                pressure_fields(ctx, pressure, &form.pressure)) }
            { subsection(reports, SectionKey::Stirring, "Stirring",
                stirring_fields(ctx, stirring, &form.stirring)) }
            { subsection(reports, SectionKey::Flow, "Flow",
                flow_fields(ctx, flow, &form.flow)) }
            { subsection(reports, SectionKey::Electrochemistry, "Electrochemistry",
                electro_fields(ctx, electro, &form.electro)) }
        </div>
    }
}

fn subsection(reports: &Reports, key: SectionKey, title: &str, body: Html) -> Html {
    html! {
        <fieldset id={key.anchor()} class="subsection">
            <legend>{ title }</legend>
            { validate_box(reports, key) }
            { body }
        </fieldset>
    }
}

pub fn temperature_fields(ctx: &EditorContext, lens: FormLens<TemperatureForm>, form: &TemperatureForm) -> Html {
    html! {
        <>
            { typed_input(ctx, "control", lens.field(|t: &mut TemperatureForm| &mut t.control), &form.control) }
            { metric_input(ctx, "setpoint", lens.field(|t: &mut TemperatureForm| &mut t.setpoint), &form.setpoint) }
            { for form.measurements.live().map(|(id, m)| {
                let lens = lens.focus(move |t: &mut TemperatureForm| t.measurements.get_mut(id));
                html! {
                    <div class="measurement">
                        { typed_input(ctx, "type", lens.field(|m: &mut TemperatureMeasurementForm| &mut m.kind), &m.kind) }
                        { metric_input(ctx, "temperature", lens.field(|m: &mut TemperatureMeasurementForm| &mut m.temperature), &m.temperature) }
                        { metric_input(ctx, "time", lens.field(|m: &mut TemperatureMeasurementForm| &mut m.time), &m.time) }
                        { remove_button(ctx, id) }
                    </div>
                }
            }) }
            { add_button(ctx, "measurement",
                lens.field(|t: &mut TemperatureForm| &mut t.measurements)) }
        </>
    }
}

fn pressure_fields(ctx: &EditorContext, lens: FormLens<PressureForm>, form: &PressureForm) -> Html {
    html! {
        <>
            { typed_input(ctx, "control", lens.field(|p: &mut PressureForm| &mut p.control), &form.control) }
            { metric_input(ctx, "setpoint", lens.field(|p: &mut PressureForm| &mut p.setpoint), &form.setpoint) }
            { typed_input(ctx, "atmosphere", lens.field(|p: &mut PressureForm| &mut p.atmosphere), &form.atmosphere) }
            { for form.measurements.live().map(|(id, m)| {
                let lens = lens.focus(move |p: &mut PressureForm| p.measurements.get_mut(id));
                html! {
                    <div class="measurement">
                        { typed_input(ctx, "type", lens.field(|m: &mut PressureMeasurementForm| &mut m.kind), &m.kind) }
                        { metric_input(ctx, "pressure", lens.field(|m: &mut PressureMeasurementForm| &mut m.pressure), &m.pressure) }
                        { metric_input(ctx, "time", lens.field(|m: &mut PressureMeasurementForm| &mut m.time), &m.time) }
                        { remove_button(ctx, id) }
                    </div>
                }
            }) }
            { add_button(ctx, "measurement",
                lens.field(|p: &mut PressureForm| &mut p.measurements)) }
        </>
    }
}

pub fn stirring_fields(ctx: &EditorContext, lens: FormLens<StirringForm>, form: &StirringForm) -> Html {
    html! {
        <>
            { typed_input(ctx, "method", lens.field(|s: &mut StirringForm| &mut s.method), &form.method) }
            { typed_input(ctx, "rate", lens.field(|s: &mut StirringForm| &mut s.rate), &form.rate) }
            { text_input(ctx, "rpm", lens.field(|s: &mut StirringForm| &mut s.rpm), &form.rpm) }
        </>
    }
}

fn flow_fields(ctx: &EditorContext, lens: FormLens<FlowForm>, form: &FlowForm) -> Html {
    html! {
        <>
            { typed_input(ctx, "type", lens.field(|f: &mut FlowForm| &mut f.flow_type), &form.flow_type) }
            { text_input(ctx, "pump", lens.field(|f: &mut FlowForm| &mut f.pump), &form.pump) }
            { typed_input(ctx, "tubing", lens.field(|f: &mut FlowForm| &mut f.tubing), &form.tubing) }
            { metric_input(ctx, "diameter", lens.field(|f: &mut FlowForm| &mut f.diameter), &form.diameter) }
        </>
    }
}

fn electro_fields(ctx: &EditorContext, lens: FormLens<ElectroForm>, form: &ElectroForm) -> Html {
    html! {
        <>
            { typed_input(ctx, "type", lens.field(|e: &mut ElectroForm| &mut e.kind), &form.kind) }
            { metric_input(ctx, "current", lens.field(|e: &mut ElectroForm| &mut e.current), &form.current) }
            { metric_input(ctx, "voltage", lens.field(|e: &mut ElectroForm| &mut e.voltage), &form.voltage) }
            { text_input(ctx, "anode", lens.field(|e: &mut ElectroForm| &mut e.anode), &form.anode) }
            { text_input(ctx, "cathode", lens.field(|e: &mut ElectroForm| &mut e.cathode), &form.cathode) }
            { metric_input(ctx, "electrode separation", lens.field(|e: &mut ElectroForm| &mut e.separation), &form.separation) }
            { typed_input(ctx, "cell", lens.field(|e: &mut ElectroForm| &mut e.cell), &form.cell) }
            { for form.measurements.live().map(|(id, m)| {
                let lens = lens.focus(move |e: &mut ElectroForm| e.measurements.get_mut(id));
                html! {
                    <div class="measurement">
                        { metric_input(ctx, "time", lens.field(|m: &mut ElectroMeasurementForm| &mut m.time), &m.time) }
                        { radio_group(ctx, format!("electro_signal_{}", id), lens.clone(),
                            &ElectroSignal::ALL, m.signal, ElectroSignal::label,
                            |m: &mut ElectroMeasurementForm, signal| m.signal = Some(signal)) }
                        if m.signal == Some(ElectroSignal::Current) {
                            { metric_input(ctx, "current", lens.field(|m: &mut ElectroMeasurementForm| &mut m.current), &m.current) }
                        }
                        if m.signal == Some(ElectroSignal::Voltage) {
                            { metric_input(ctx, "voltage", lens.field(|m: &mut ElectroMeasurementForm| &mut m.voltage), &m.voltage) }
                        }
                        { remove_button(ctx, id) }
                    </div>
                }
            }) }
            { add_button(ctx, "measurement",
                lens.field(|e: &mut ElectroForm| &mut e.measurements)) }
        </>
    }
}
